mod detect_wildcard;

pub use detect_wildcard::{random_label, DetectWildcardUseCase, DEFAULT_SAMPLES, SAMPLE_LABEL_LEN};
