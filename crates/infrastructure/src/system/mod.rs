pub mod resolv_conf;

pub use resolv_conf::{parse_resolv_conf, read_nameservers, system_nameservers, RESOLV_CONF_PATH};
