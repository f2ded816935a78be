pub mod app_config;
pub mod codec;
pub mod controller;
pub mod dispatcher;
pub mod domain;
pub mod gateway;
pub mod perceptual;
pub mod settings;
pub mod view_listener;
