//! Use cases for the chat client

pub mod stream_controller;
