//! Configuration sources
//!
//! The facade only needs two things from configuration: an `id`, and the
//! `log` namespace as a JSON object mapping transport names to options.

pub mod json_config;

pub use json_config::JsonConfig;

use crate::core::Result;
use serde_json::Value;
use std::sync::Arc;

/// Retrieval options for [`Configuration::get`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GetOptions {
    /// Deep-merge the key across every configuration layer
    pub recursive: bool,
}

impl GetOptions {
    pub const fn recursive() -> Self {
        Self { recursive: true }
    }

    pub const fn shallow() -> Self {
        Self { recursive: false }
    }
}

pub trait Configuration: Send + Sync {
    /// Identifier of this configuration, used as the logger id prefix
    fn id(&self) -> String;

    /// Look up `key` (dotted paths allowed); a missing key is `Value::Null`
    fn get(&self, key: &str, options: GetOptions) -> Result<Value>;
}

impl<C: Configuration + ?Sized> Configuration for Arc<C> {
    fn id(&self) -> String {
        (**self).id()
    }

    fn get(&self, key: &str, options: GetOptions) -> Result<Value> {
        (**self).get(key, options)
    }
}

impl<C: Configuration + ?Sized> Configuration for &C {
    fn id(&self) -> String {
        (**self).id()
    }

    fn get(&self, key: &str, options: GetOptions) -> Result<Value> {
        (**self).get(key, options)
    }
}
