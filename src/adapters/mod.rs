pub mod core_graph;
pub mod http;
pub mod identity;
pub mod mailing_list;
pub mod processor;
