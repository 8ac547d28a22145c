//! Business logic services.

#![allow(missing_docs)]

pub mod dispatch;
pub mod form;
pub mod notification;
pub mod session;
pub mod store;

pub use dispatch::{NotificationDispatcher, SharedDispatcher, SimulatedDispatcher};
pub use form::{
    FieldGroup, NotificationForm, NotificationRequest, Platform, UnknownPlatform, validate,
    visible_groups,
};
pub use notification::{Acknowledgment, NotificationService};
pub use session::{Session, SessionService};
pub use store::{
    InMemoryNotificationStore, NotificationHistoryRecord, NotificationStore,
    SharedNotificationStore, sample_history,
};
