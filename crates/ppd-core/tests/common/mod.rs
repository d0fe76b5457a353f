pub mod paper_server;
