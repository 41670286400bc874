fn main() -> std::process::ExitCode {
    asyncqueue::app::startup::startup()
}
