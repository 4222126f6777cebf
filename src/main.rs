#[actix_web::main]
async fn main() -> std::io::Result<()> {
    contract_desk_server::run().await
}
