//! HTTP 通用传输 - JSON / Form 服务共用

use crate::error::{Result, ValidationError};
use crate::notification::notify_type::NotifyType;
use crate::notification::overflow::Chunk;
use crate::notification::service::SendResult;
use crate::notification::throttle::RequestThrottle;
use crate::notification::service_url::{encode_component, encode_path, encode_query, ServiceUrl};
use reqwest::blocking::Client;
use reqwest::header::USER_AGENT;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::{debug, info, warn};

/// payload 结构版本
pub const PAYLOAD_VERSION: &str = "1.0";

/// 默认连接超时（秒）
pub const DEFAULT_CONNECT_TIMEOUT_SECS: f64 = 4.0;

/// 默认读取超时（秒）
pub const DEFAULT_READ_TIMEOUT_SECS: f64 = 4.0;

const APP_ID: &str = concat!("notify-overflow/", env!("CARGO_PKG_VERSION"));

/// HTTP 请求方法
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HttpMethod {
    #[default]
    Post,
    Get,
    Put,
    Patch,
    Delete,
    Head,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Post => "POST",
            HttpMethod::Get => "GET",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Head => "HEAD",
        }
    }

    fn to_reqwest(self) -> reqwest::Method {
        match self {
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Patch => reqwest::Method::PATCH,
            HttpMethod::Delete => reqwest::Method::DELETE,
            HttpMethod::Head => reqwest::Method::HEAD,
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for HttpMethod {
    type Err = ValidationError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "POST" => Ok(HttpMethod::Post),
            "GET" => Ok(HttpMethod::Get),
            "PUT" => Ok(HttpMethod::Put),
            "PATCH" => Ok(HttpMethod::Patch),
            "DELETE" => Ok(HttpMethod::Delete),
            "HEAD" => Ok(HttpMethod::Head),
            _ => Err(ValidationError::InvalidMethod(s.to_string())),
        }
    }
}

/// 请求正文
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Json(Value),
    Form(Vec<(String, String)>),
}

/// HTTP 目标端点
#[derive(Debug)]
pub struct HttpTarget {
    schema: String,
    secure: bool,
    host: String,
    port: Option<u16>,
    user: Option<String>,
    password: Option<String>,
    fullpath: String,
    method: HttpMethod,
    headers: BTreeMap<String, String>,
    params: BTreeMap<String, String>,
    payload_extras: BTreeMap<String, String>,
    verify_certificate: bool,
    connect_timeout: Duration,
    read_timeout: Duration,
    throttle: RequestThrottle,
}

impl HttpTarget {
    /// 从服务 URL 创建
    pub fn from_url(url: &ServiceUrl, secure: bool, request_interval: Duration) -> Result<Self> {
        let method = match url.arg("method") {
            Some(m) if !m.is_empty() => m.parse()?,
            _ => HttpMethod::default(),
        };

        Ok(Self {
            schema: url.schema.clone(),
            secure,
            host: url.host.clone(),
            port: url.port,
            user: url.user.clone(),
            password: url.password.clone(),
            fullpath: url.fullpath.clone(),
            method,
            headers: url.headers.clone(),
            params: url.params.clone(),
            payload_extras: url.payload_extras.clone(),
            verify_certificate: url.bool_arg("verify", true),
            connect_timeout: timeout_arg(url, "cto", DEFAULT_CONNECT_TIMEOUT_SECS),
            read_timeout: timeout_arg(url, "rto", DEFAULT_READ_TIMEOUT_SECS),
            throttle: RequestThrottle::new(request_interval),
        })
    }

    pub fn method(&self) -> HttpMethod {
        self.method
    }

    /// 请求地址
    pub fn endpoint(&self) -> String {
        let scheme = if self.secure { "https" } else { "http" };
        let port = self.port.map(|p| format!(":{}", p)).unwrap_or_default();
        format!("{}://{}{}{}", scheme, self.host, port, self.fullpath)
    }

    /// 基础 payload：version / title / message / type
    pub fn base_payload(&self, chunk: &Chunk, notify_type: NotifyType) -> Map<String, Value> {
        let mut payload = Map::new();
        payload.insert("version".to_string(), Value::from(PAYLOAD_VERSION));
        payload.insert("title".to_string(), Value::from(chunk.title.as_str()));
        payload.insert("message".to_string(), Value::from(chunk.body.as_str()));
        payload.insert("type".to_string(), Value::from(notify_type.as_str()));
        self.apply_payload_extras(&mut payload);
        payload
    }

    /// 应用 `:key=value` 参数
    ///
    /// 已存在的字段：值为空则删除，否则改名为该值；不存在的字段直接追加。
    fn apply_payload_extras(&self, payload: &mut Map<String, Value>) {
        for (key, value) in &self.payload_extras {
            if payload.contains_key(key) {
                if value.is_empty() {
                    payload.remove(key);
                } else if let Some(existing) = payload.remove(key) {
                    payload.insert(value.clone(), existing);
                }
            } else {
                payload.insert(key.clone(), Value::from(value.as_str()));
            }
        }
    }

    /// 执行请求
    pub fn execute(&self, body: RequestBody) -> anyhow::Result<SendResult> {
        let endpoint = self.endpoint();
        debug!(
            url = %endpoint,
            method = %self.method,
            verify = self.verify_certificate,
            "HTTP request"
        );

        // 任何远程 I/O 之前先限流
        self.throttle.wait();

        let client = Client::builder()
            .connect_timeout(self.connect_timeout)
            .timeout(self.read_timeout)
            .danger_accept_invalid_certs(!self.verify_certificate)
            .build()?;

        let mut request = client
            .request(self.method.to_reqwest(), &endpoint)
            .header(USER_AGENT, APP_ID);

        for (key, value) in &self.headers {
            request = request.header(key.as_str(), value.as_str());
        }

        if !self.params.is_empty() {
            request = request.query(&self.params);
        }

        if let Some(user) = &self.user {
            request = request.basic_auth(user, self.password.as_ref());
        }

        request = match body {
            RequestBody::Json(value) => request.json(&value),
            RequestBody::Form(fields) => request.form(&fields),
        };

        match request.send() {
            Ok(response) => {
                let status = response.status();
                if status.is_success() {
                    info!(host = %self.host, method = %self.method, "Notification sent");
                    Ok(SendResult::Sent)
                } else {
                    warn!(
                        host = %self.host,
                        method = %self.method,
                        status = status.as_u16(),
                        "Failed to send notification"
                    );
                    Ok(SendResult::Failed(format!("HTTP {}", status)))
                }
            }
            Err(e) => {
                warn!(host = %self.host, error = %e, "A connection error occurred sending notification");
                Ok(SendResult::Failed(e.to_string()))
            }
        }
    }

    /// 还原 URL
    pub fn url(&self, privacy: bool, mut params: BTreeMap<String, String>) -> String {
        params.insert("method".to_string(), self.method.to_string());
        if !self.verify_certificate {
            params.insert("verify".to_string(), "no".to_string());
        }
        params.extend(self.headers.iter().map(|(k, v)| (format!("+{}", k), v.clone())));
        params.extend(self.params.iter().map(|(k, v)| (format!("-{}", k), v.clone())));
        params.extend(self.payload_extras.iter().map(|(k, v)| (format!(":{}", k), v.clone())));

        let auth = match (&self.user, &self.password) {
            (Some(user), Some(password)) => {
                let password = if privacy {
                    "****".to_string()
                } else {
                    encode_component(password)
                };
                format!("{}:{}@", encode_component(user), password)
            }
            (Some(user), None) => format!("{}@", encode_component(user)),
            _ => String::new(),
        };

        let default_port = if self.secure { 443 } else { 80 };
        let port = match self.port {
            Some(p) if p != default_port => format!(":{}", p),
            _ => String::new(),
        };

        let path = if self.fullpath.is_empty() {
            "/".to_string()
        } else {
            encode_path(&self.fullpath)
        };

        format!(
            "{}://{}{}{}{}?{}",
            self.schema,
            auth,
            self.host,
            port,
            path,
            encode_query(&params)
        )
    }
}

fn timeout_arg(url: &ServiceUrl, key: &str, default: f64) -> Duration {
    let default = Duration::from_secs_f64(default);
    let Some(value) = url.arg(key) else {
        return default;
    };

    match value.trim().parse::<f64>().map(Duration::try_from_secs_f64) {
        Ok(Ok(timeout)) if !timeout.is_zero() => timeout,
        _ => {
            warn!(argument = key, value, "Invalid timeout value, using default");
            default
        }
    }
}
