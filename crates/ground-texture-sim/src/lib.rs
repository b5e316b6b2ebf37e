#![doc = env!("CARGO_PKG_DESCRIPTION")]

#[doc(inline)]
pub use gts_transforms as transforms;

#[doc(inline)]
pub use gts_io as io;

#[doc(inline)]
pub use gts_render as render;
