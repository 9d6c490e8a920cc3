use log::info;
use mongodb::bson::doc;
use mongodb::{Client, options::ClientOptions};

/// Connect to MongoDB and ping the server so a bad URI fails at startup.
pub async fn connect_to_mongo(mongodb_uri: &str) -> Result<Client, mongodb::error::Error> {
    let mut client_options = ClientOptions::parse(mongodb_uri).await?;
    client_options.app_name = Some("my-blog".to_string());

    let client = Client::with_options(client_options)?;

    client
        .database("admin")
        .run_command(doc! { "ping": 1 })
        .await?;

    info!("Connected successfully to MongoDB");

    Ok(client)
}
