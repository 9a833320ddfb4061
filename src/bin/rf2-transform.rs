use rf2_graph::app::run_rf2_transform;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    run_rf2_transform(std::env::args().skip(1))
}
