#[tokio::main]
async fn main() {
    court_booking_backend::run().await;
}
