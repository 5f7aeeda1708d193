use crate::responses::error_to_response;
use crate::router::handle;
use astra::Server;
use std::net::SocketAddr;

mod domain;
mod errors;
mod responses;
mod router;
mod scraper;
mod spreadsheets;
mod templates;

#[cfg(test)]
mod tests;

fn main() {
    // Listen address is the only configuration; everything else is request-scoped.
    let raw_addr =
        std::env::var("FINN_PARSER_ADDR").unwrap_or_else(|_| "127.0.0.1:3000".to_string());

    let addr: SocketAddr = match raw_addr.parse() {
        Ok(addr) => addr,
        Err(e) => {
            eprintln!("❌ Invalid listen address {raw_addr}: {e}");
            std::process::exit(1);
        }
    };

    println!("Starting server at http://{addr}");

    let server = Server::bind(addr).max_workers(8);

    let result = server.serve(move |req, _info| match handle(req) {
        Ok(resp) => resp,
        Err(err) => error_to_response(err),
    });

    if let Err(e) = result {
        eprintln!("Server ended with error: {e}");
    }

    println!("Server shut down cleanly.");
}
