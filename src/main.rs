fn main() {
    websource::cli::run();
}
