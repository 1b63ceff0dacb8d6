pub mod relay_service;
pub mod telegram_service;
pub mod template;
