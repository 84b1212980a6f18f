fn main() {
    if let Err(err) = flowgraph_renderer::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
