pub mod auth_service;
pub mod company_service;
pub mod product_service;
pub mod sale_service;
pub mod traits;
pub mod user_service;

pub use auth_service::AuthService;
pub use company_service::CompanyService;
pub use product_service::ProductService;
pub use sale_service::SaleService;
pub use traits::RecordService;
pub use user_service::UserService;
