//! # Application Layer
//!
//! The root application object and the controllers that hold UI-facing
//! state: wallet connection, merchant hierarchy, transaction feed, and
//! payment QR generation. Controllers talk to the server exclusively
//! through the service traits in [`crate::core::service`].

pub mod connector;
pub mod feed;
pub mod merchant;
pub mod payment;
pub mod state;

pub use connector::{ConnectionState, WalletConnector};
pub use feed::{DayGroup, FeedPhase, TransactionFeed};
pub use merchant::{EntityView, MerchantController, Recovery, ViewEntry};
pub use payment::{GeneratedQr, PaymentQrGenerator, QrSource};
pub use state::App;
