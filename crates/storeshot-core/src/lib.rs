//! Storeshot Core Types and Definitions
//!
//! This crate provides the value types shared by the Storeshot compositing
//! pipeline. It includes:
//!
//! - **Geometry**: Points, sizes, rectangles and aspect-fill placement ([`geometry`] module)
//! - **Colors**: Hex color resolution and the composite palette ([`color::ResolvedColors`])
//! - **Devices**: Export sizes and device families ([`device::DeviceSize`])
//! - **Screens**: Copy and pose for a single marketing screen ([`screen::ScreenConfig`])

pub mod color;
pub mod device;
pub mod geometry;
pub mod screen;
