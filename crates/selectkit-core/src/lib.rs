//! Core types and traits for the selectkit dropdown widget.
//!
//! This crate provides foundational types used throughout selectkit:
//! - Geometric primitives: [`Size`], [`Rect`]
//! - Input events: [`Event`], [`Key`]
//! - Widget identity and the [`Widget`] trait: [`WidgetId`], [`ElementRef`]
//! - Document-level click subscriptions: [`DocumentListeners`], [`Subscription`]

mod event;
mod geometry;
pub mod listeners;
pub mod widget;

pub use event::{Event, Key};
pub use geometry::{Rect, Size};
pub use listeners::{ClickListener, DocumentListeners, ListenerId, Subscription};
pub use widget::{
    AccessibleRole, ElementRef, EventResponse, LayoutResult, Slot, TypeId, Widget, WidgetId,
};
