pub async fn get_index() -> String {
    "[ok]".to_owned()
}
