pub const URL_PATH_API: &str = "/api/v1";

/// 调用方身份头，值为 profile 邮箱
pub const PROFILE_EMAIL_HEADER: &str = "X-Profile-Email";
