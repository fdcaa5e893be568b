mod codec;
mod error;
mod lttb;
mod point;
mod reporters;
mod synth;
mod view;
mod window;

pub use codec::*;
pub use error::*;
pub use lttb::*;
pub use point::*;
pub use reporters::*;
pub use synth::*;
pub use view::*;
pub use window::*;
