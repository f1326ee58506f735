fn main() -> anyhow::Result<()> {
    cdacgen::cli::run()
}
