pub mod key_storage;

// Réexportations key_storage
pub use key_storage::{
    DomainParametersJson, PublicKeyJson, KeyPairJson, CiphertextJson,
    biguint_to_hex, hex_to_biguint, biguint_to_decimal, decimal_to_biguint,
    params_to_json, public_key_to_json, keypair_to_json, ciphertext_to_json,
    json_to_params, json_to_public_key, json_to_keypair, json_to_ciphertext,
    ciphertext_to_bytes, ciphertext_from_bytes,
    save_keypair_json, save_public_key_json, save_ciphertext_json,
    load_keypair_json, load_public_key_json, load_ciphertext_json,
    key_file_exists, ensure_keys_directory,
};
