//! 服务注册表 - schema 到服务构造函数的静态映射

use super::service::NotificationService;
use super::services::{FormService, JsonService};
use super::service_url::ServiceUrl;
use crate::error::{Result, ValidationError};

/// 服务构造函数；第二个参数表示是否使用安全 schema
pub type ServiceConstructor = fn(&ServiceUrl, bool) -> Result<Box<dyn NotificationService>>;

/// 注册表条目
#[derive(Clone, Copy)]
pub struct ServiceEntry {
    /// 服务名称
    pub name: &'static str,
    /// 普通 schema
    pub protocol: &'static str,
    /// 安全 schema（TLS）
    pub secure_protocol: Option<&'static str>,
    pub build: ServiceConstructor,
}

static SERVICES: &[ServiceEntry] = &[
    ServiceEntry {
        name: "JSON",
        protocol: JsonService::PROTOCOL,
        secure_protocol: Some(JsonService::SECURE_PROTOCOL),
        build: build_json,
    },
    ServiceEntry {
        name: "Form",
        protocol: FormService::PROTOCOL,
        secure_protocol: Some(FormService::SECURE_PROTOCOL),
        build: build_form,
    },
];

fn build_json(url: &ServiceUrl, secure: bool) -> Result<Box<dyn NotificationService>> {
    let service = JsonService::from_url(url, secure)?;
    Ok(Box::new(service))
}

fn build_form(url: &ServiceUrl, secure: bool) -> Result<Box<dyn NotificationService>> {
    let service = FormService::from_url(url, secure)?;
    Ok(Box::new(service))
}

/// 所有已注册的服务
pub fn entries() -> &'static [ServiceEntry] {
    SERVICES
}

/// 查找 schema 对应的条目，同时返回是否为安全 schema
pub fn lookup(schema: &str) -> Option<(&'static ServiceEntry, bool)> {
    let schema = schema.to_lowercase();
    SERVICES.iter().find_map(|entry| {
        if entry.protocol == schema {
            Some((entry, false))
        } else if entry.secure_protocol == Some(schema.as_str()) {
            Some((entry, true))
        } else {
            None
        }
    })
}

/// 所有支持的 schema
pub fn supported_schemas() -> Vec<&'static str> {
    SERVICES
        .iter()
        .flat_map(|entry| std::iter::once(entry.protocol).chain(entry.secure_protocol))
        .collect()
}

/// 解析 URL 并创建对应的服务
pub fn instantiate(raw: &str) -> Result<Box<dyn NotificationService>> {
    let url = ServiceUrl::parse(raw)?;
    let (entry, secure) =
        lookup(&url.schema).ok_or_else(|| ValidationError::UnknownSchema(url.schema.clone()))?;
    (entry.build)(&url, secure)
}
