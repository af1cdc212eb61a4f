pub mod ack;
pub mod http_gateway;
pub mod ingest;
