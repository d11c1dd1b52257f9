//! Classification of credential-bearing preference keys.
//!
//! Only export consults this filter. Import writes whatever the document
//! carries.

/// Keys known to hold API credentials.
pub const SENSITIVE_KEYS: [&str; 9] = [
    "net.devemperor.asr.api_key",
    "net.devemperor.asr.transcription_api_key",
    "net.devemperor.asr.transcription_api_key_openai",
    "net.devemperor.asr.transcription_api_key_groq",
    "net.devemperor.asr.transcription_api_key_custom",
    "net.devemperor.asr.rewording_api_key",
    "net.devemperor.asr.rewording_api_key_openai",
    "net.devemperor.asr.rewording_api_key_groq",
    "net.devemperor.asr.rewording_api_key_custom",
];

/// Substring that marks any key as a credential.
///
/// Catches provider keys added later under the same naming convention.
pub const API_KEY_MARKER: &str = "api_key";

/// Whether `key` holds a secret that export must omit unless asked not to.
pub fn is_sensitive(key: &str) -> bool {
    SENSITIVE_KEYS.contains(&key) || key.contains(API_KEY_MARKER)
}
