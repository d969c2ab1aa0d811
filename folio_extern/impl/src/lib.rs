pub mod contact;
mod http;
