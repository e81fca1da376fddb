fn main() -> anyhow::Result<()> {
    tallybench_cli::run()
}
