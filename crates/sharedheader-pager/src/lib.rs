pub mod broker;
pub mod channel;
pub mod controller;
pub mod observer;
pub mod source;
pub mod value;

pub use broker::{ActivationBroker, AdjustmentState};
pub use channel::ScrollChannel;
pub use controller::{HeaderTransform, PagerController, SelectCallback};
pub use observer::IndexObserver;
pub use source::HeaderSource;
pub use value::SharedValue;
