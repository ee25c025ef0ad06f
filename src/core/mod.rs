pub mod debounce;
pub mod fetch;
pub mod forms;
pub mod menu;
pub mod pagination;
pub mod services;
pub mod session;
pub mod toggle;
