//! Capability contracts.
//!
//! Each trait is one feature area the embedding application may implement.
//! Only [`PreviewProvider`] is mandatory; the gateway exposes the routes of
//! every other contract only when a provider for it is configured.
//!
//! Every method receives the request's [`Context`](crate::Context) and
//! reports failures through [`ProviderError`](crate::ProviderError).
//!
//! The traits use `async_trait` so the gateway can hold providers as
//! `Arc<dyn Trait>` chosen at configuration time.

pub mod edit;
pub mod notify;
pub mod preview;
pub mod user;
pub mod version;
pub mod watermark;

pub use edit::EditProvider;
pub use notify::NotifyProvider;
pub use preview::PreviewProvider;
pub use user::UserProvider;
pub use version::VersionProvider;
pub use watermark::WatermarkProvider;
