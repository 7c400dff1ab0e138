//! End-to-end generation tests over a realistic schema dump.

use dalgen_codegen_go::Generator;
use dalgen_schema::parse;

const DUMP: &str = r#"-- MySQL dump 10.13  Distrib 5.7.21
--
-- Host: localhost    Database: account
-- ------------------------------------------------------
/*!40101 SET NAMES utf8 */;

DROP TABLE IF EXISTS `user`;
CREATE TABLE `user` (
  `id` bigint(20) unsigned NOT NULL AUTO_INCREMENT,
  `user_id` varchar(32) NOT NULL,
  `user_name` varchar(32) NOT NULL,
  `password_hash` varchar(128) NOT NULL,
  `icon` varchar(256) DEFAULT NULL,
  `state` int(11) NOT NULL,
  `create_time` timestamp NOT NULL DEFAULT CURRENT_TIMESTAMP,
  `update_time` timestamp NOT NULL DEFAULT CURRENT_TIMESTAMP ON UPDATE CURRENT_TIMESTAMP,
  `update_version` bigint(20) NOT NULL DEFAULT '0',
  PRIMARY KEY (`id`),
  UNIQUE KEY `user_id_unique` (`user_id`),
  KEY `state_index` (`state`)
) ENGINE=InnoDB DEFAULT CHARSET=utf8;

DROP TABLE IF EXISTS `oauth_token`;
CREATE TABLE `oauth_token` (
  `id` bigint(20) unsigned NOT NULL AUTO_INCREMENT,
  `provider` varchar(32) NOT NULL,
  `open_id` varchar(128) NOT NULL,
  `user_id` varchar(32) NOT NULL,
  `expires_at` datetime DEFAULT NULL,
  PRIMARY KEY (`id`),
  UNIQUE KEY `provider_open_id` (`provider`,`open_id`),
  KEY `user_id_index` (`user_id`)
) ENGINE=InnoDB DEFAULT CHARSET=utf8;
"#;

fn generate() -> String {
    let schema = parse(DUMP, "account.sql").expect("dump must parse");
    Generator::new(&schema, "account")
        .generate()
        .expect("generation must succeed")
}

#[test]
fn test_parses_both_tables() {
    let schema = parse(DUMP, "account.sql").unwrap();
    assert_eq!(schema.database.as_deref(), Some("account"));
    assert_eq!(schema.tables.len(), 2);
    assert_eq!(schema.tables[0].ident, "User");
    assert_eq!(schema.tables[1].ident, "OauthToken");
}

#[test]
fn test_record_structs_use_storage_types() {
    let out = generate();
    assert!(out.contains("type User struct {"));
    assert!(out.contains("Id uint64 //size=20"));
    assert!(out.contains("Icon sql.NullString //size=256"));
    assert!(out.contains("CreateTime time.Time"));
    assert!(out.contains("ExpiresAt mysql.NullTime"));
}

#[test]
fn test_versioned_update_for_user_table() {
    let out = generate();
    assert!(out.contains(
        "UPDATE user SET user_id=?,user_name=?,password_hash=?,icon=?,state=?,update_version=update_version+1 WHERE id=? AND update_version=?"
    ));
}

#[test]
fn test_unversioned_update_for_token_table() {
    let out = generate();
    assert!(out.contains(
        "UPDATE oauth_token SET provider=?,open_id=?,user_id=?,expires_at=? WHERE id=?"
    ));
}

#[test]
fn test_insert_statements_skip_generated_columns() {
    let out = generate();
    assert!(out.contains(
        "INSERT INTO user (user_id,user_name,password_hash,icon,state,update_version) VALUES (?,?,?,?,?,?)"
    ));
    assert!(out.contains(
        "INSERT INTO oauth_token (provider,open_id,user_id,expires_at) VALUES (?,?,?,?)"
    ));
}

#[test]
fn test_duplicate_key_update_lists_non_unique_columns() {
    let out = generate();
    assert!(out.contains(
        " ON DUPLICATE KEY UPDATE user_name=VALUES(user_name),password_hash=VALUES(password_hash),icon=VALUES(icon),state=VALUES(state),update_version=VALUES(update_version)"
    ));
}

#[test]
fn test_index_lookups() {
    let out = generate();
    // Single unique index.
    assert!(out.contains(
        "func (dao *UserDao) SelectByUserId(ctx context.Context, tx *wrap.Tx, userId string) (*User, error) {"
    ));
    // Single non-unique index.
    assert!(out.contains(
        "func (dao *UserDao) SelectListByState(ctx context.Context, tx *wrap.Tx, state int32) ([]*User, error) {"
    ));
    // Compound unique: full prefix is unique-select, short prefix is list-select.
    assert!(out.contains(
        "func (dao *OauthTokenDao) SelectByProviderOpenId(ctx context.Context, tx *wrap.Tx, provider string, openId string) (*OauthToken, error) {"
    ));
    assert!(out.contains(
        "func (dao *OauthTokenDao) SelectListByProvider(ctx context.Context, tx *wrap.Tx, provider string) ([]*OauthToken, error) {"
    ));
    // Never keyed on a non-leading column alone.
    assert!(!out.contains("SelectListByOpenId"));
}

#[test]
fn test_database_aggregate() {
    let out = generate();
    assert!(out.contains("type DB struct {\n\twrap.DB\n\tUser *UserDao\n\tOauthToken *OauthTokenDao\n}"));
    assert!(out.contains("connectionString += \"/account?parseTime=true\""));
}

#[test]
fn test_round_trip_determinism() {
    assert_eq!(generate(), generate());
}

#[test]
fn test_unterminated_block_fails_without_output() {
    let truncated = &DUMP[..DUMP.rfind("PRIMARY KEY").unwrap()];
    let err = parse(truncated, "account.sql").unwrap_err();
    assert!(matches!(
        *err,
        dalgen_schema::Error::UnterminatedTable { ref table, .. } if table == "oauth_token"
    ));
}
