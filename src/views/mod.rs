//! Server-rendered pages.

pub mod dashboard;
pub mod format;
pub mod pages;

pub use dashboard::{DashboardData, DashboardTemplate};
pub use pages::{AuthPage, AuthPageTemplate, LandingTemplate, NotFoundTemplate, ProtectedTemplate};
