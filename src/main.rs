use dynlayout::cli::CommandLineInterface;

fn main() -> anyhow::Result<()> {
    env_logger::init();
    CommandLineInterface::load().run()
}
