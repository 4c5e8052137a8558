//! Client-side behavior shared by the browser UI and the terminal client.
//!
//! Nothing here touches the DOM or a socket. Each module is a small piece of
//! state plus the rules that move it: who may see which route, what a CRUD
//! screen does after a save, how a lesson run reacts to the server's verdict,
//! what the Braille panel accepts while the device is offline. Front ends own
//! the I/O and feed results back in.

pub mod crud;
pub mod device;
pub mod lesson;
pub mod route;
pub mod scope;
pub mod search;
pub mod session;
pub mod validate;

pub use crud::{ActionError, CrudService, CrudView, EditMode, Record};
pub use device::{DevicePanel, KeyAction, PanelCommand};
pub use lesson::{ApiLessonPort, Command, Event, LessonPort, LessonSession, Phase, Timer};
pub use route::{Resolution, Route};
pub use scope::ViewScope;
pub use search::Searchable;
pub use session::{MemoryStorage, SessionStorage, SessionStore};
pub use validate::ValidationError;
