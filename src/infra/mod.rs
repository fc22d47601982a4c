mod clock;
mod host;
mod navigator;
mod state_dir;
mod theme_store;
mod todo_store;
mod weather;

pub use clock::*;
pub use host::*;
pub use navigator::*;
pub use state_dir::*;
pub use theme_store::*;
pub use todo_store::*;
pub use weather::*;
