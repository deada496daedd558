//! Showcase state machines: portfolio filter, project modal, testimonial
//! carousel, contact form. None of these touch a terminal.

pub mod autoplay;
pub mod carousel;
pub mod catalog;
pub mod contact;
pub mod content;
pub mod filter;
pub mod modal;
