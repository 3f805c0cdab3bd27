pub mod category;
pub mod env_value;
pub mod payload;
pub mod providers;
pub mod record;
pub mod status;

pub use category::{Category, EnvField};
pub use env_value::EnvValue;
pub use payload::ConfigPayload;
pub use providers::ProviderInfo;
pub use record::{ConfigRecord, RecordAction};
pub use status::{PortsInfo, ServiceStatus, StatusSnapshot, TestOutcome};
