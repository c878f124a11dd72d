fn main() {
    gcp_wif::app::cli::run();
}
