//! Well-known local emulator connection strings

use crate::types::ApiKind;

pub const EMULATOR_HOST: &str = "localhost";

/// Fixed key every local emulator accepts
pub const EMULATOR_PASSWORD: &str =
    "C2y6yDjf5/R+ob0N8A7Cgv30VRDJIWEHLM+4QDU5DE2nQ9nDuVTqobD4b8mGGyPMbIZnqyMsEcaGQy67XIw/Jw==";

/// Connection string of the local emulator for `api` on `port`
pub fn emulator_connection_string(api: ApiKind, port: u16) -> String {
    if api.is_mongo() {
        format!(
            "mongodb://{host}:{password}@{host}:{port}/?ssl=true",
            host = EMULATOR_HOST,
            password = urlencoding::encode(EMULATOR_PASSWORD),
        )
    } else {
        format!("AccountEndpoint=https://{EMULATOR_HOST}:{port}/;AccountKey={EMULATOR_PASSWORD};")
    }
}

/// Display label of an emulator account, e.g. `SQL Emulator`
pub fn emulator_label(api: ApiKind) -> String {
    format!("{} Emulator", api.short_name())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accounts::{parse_docdb_connection_string, seed_hosts, MongoServerAddress};

    #[test]
    fn test_mongo_emulator_string() {
        let cs = emulator_connection_string(ApiKind::MongoDb, 10255);
        assert_eq!(
            cs,
            "mongodb://localhost:C2y6yDjf5%2FR%2Bob0N8A7Cgv30VRDJIWEHLM%2B4QDU5DE2nQ9nDuVTqobD4b8mGGyPMbIZnqyMsEcaGQy67XIw%2FJw%3D%3D@localhost:10255/?ssl=true"
        );
        assert_eq!(seed_hosts(&cs).unwrap(), vec![MongoServerAddress::new("localhost", 10255)]);
    }

    #[test]
    fn test_docdb_emulator_string() {
        let cs = emulator_connection_string(ApiKind::Table, 8081);
        assert_eq!(cs, format!("AccountEndpoint=https://localhost:8081/;AccountKey={EMULATOR_PASSWORD};"));

        let parsed = parse_docdb_connection_string(&cs).unwrap();
        assert_eq!(parsed.account_id, "localhost:8081");
        assert_eq!(parsed.master_key, EMULATOR_PASSWORD);
    }

    #[test]
    fn test_labels() {
        assert_eq!(emulator_label(ApiKind::DocumentDb), "SQL Emulator");
        assert_eq!(emulator_label(ApiKind::MongoDb), "MongoDB Emulator");
    }
}
