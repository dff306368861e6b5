pub use std::collections::{HashMap, HashSet};
pub use std::path::{Path, PathBuf};
pub use std::sync::Arc;
pub use std::time::{Duration, Instant};

pub use log::{debug, error, info, warn, Level};

pub use flexi_logger::{DeferredNow, Logger, LoggerHandle, Record};

pub use serde::de::DeserializeOwned;
pub use serde::{Deserialize, Serialize};
pub use serde_json::{json, Value};

pub use chrono::{SecondsFormat, Utc};

pub use elasticsearch::{
    auth::Credentials as EsCredentials,
    cluster::ClusterHealthParts,
    http::response::Response as EsResponse,
    http::transport::{SingleNodeConnectionPool, Transport as EsTransport, TransportBuilder},
    http::Url,
    indices::IndicesExistsParts,
    ClearScrollParts, Elasticsearch, ScrollParts, SearchParts,
};

pub use reqwest::Client;

pub use anyhow::{anyhow, Result};

pub use getset::Getters;

pub use derive_new::new;

pub use async_trait::async_trait;

pub use once_cell::sync::OnceCell;

pub use dotenv::dotenv;

pub use clap::Parser;

pub use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
