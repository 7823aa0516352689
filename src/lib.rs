pub mod building {
    pub mod building;
    pub mod elevator;
    pub mod floor;
    pub mod notification;
}

pub mod order_assigner {
    pub mod cost_function;
    pub mod dispatcher;
}

pub mod timer {
    pub mod countdown;
    pub mod event_queue;
}

pub mod driver {
    pub mod input;
    pub mod output;
    pub mod realtime;
    pub mod traffic;
}

pub mod util {
    pub mod config;
    pub mod constants;
    pub mod error;
}
