mod app;
mod archive;

pub use app::App;
