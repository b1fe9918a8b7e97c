pub mod events;

pub mod gui {
    pub mod app;
    pub mod area;
    pub mod canvas;
    pub mod theme;
}

pub mod sys {
    pub mod runtime;
    pub mod watcher;
}
