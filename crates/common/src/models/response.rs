use serde::{Deserialize, Serialize};

pub const DELIVERED_MESSAGE: &str = "تم إرسال التوصية بنجاح";
pub const FAILED_MESSAGE: &str = "حدث خطأ أثناء إرسال التوصية";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelayResponse {
    pub success: bool,
    pub message: String,
}

impl RelayResponse {
    pub fn delivered() -> Self {
        Self {
            success: true,
            message: DELIVERED_MESSAGE.to_string(),
        }
    }

    pub fn failed() -> Self {
        Self {
            success: false,
            message: FAILED_MESSAGE.to_string(),
        }
    }
}
