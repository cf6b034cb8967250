pub mod comp;
pub mod dest;
pub mod inst;
pub mod jump;
pub mod mem;

pub use comp::Comp;
pub use dest::Dest;
pub use inst::{Inst, Src};
pub use jump::Jump;
