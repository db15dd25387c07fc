//! Known-answer tests against published Blowfish vectors

use blowfish::cipher::generic_array::GenericArray;
use blowfish::cipher::{BlockEncrypt, KeyInit};
use blowfish::Blowfish;
use blowfish_cbc::{BlowfishEngine, CbcCipher, CbcError, Iv};

fn unhex(text: &str) -> Vec<u8> {
    hex::decode(text).unwrap()
}

#[test]
fn test_cbc_reference_vector() {
    // Eric Young's Blowfish-CBC vector; the 29-byte message includes its
    // trailing NUL and is zero padded to 32 bytes.
    let engine = BlowfishEngine::with_key(&unhex("0123456789abcdeff0e1d2c3b4a59687")).unwrap();
    let cipher = CbcCipher::new(&engine, Iv::from_hex("fedcba9876543210").unwrap());
    let message = b"7654321 Now is the time for \0";
    assert_eq!(message.len(), 29);

    let ciphertext = cipher.encrypt(message).unwrap();
    assert_eq!(
        ciphertext,
        unhex("6b77b4d63006dee605b156e27403979358deb9e7154616d959f1652bd5ff92cc")
    );

    let decrypted = cipher.decrypt(&ciphertext).unwrap();
    assert_eq!(&decrypted[..29], &message[..]);
    assert_eq!(&decrypted[29..], &[0u8; 3]);
}

#[test]
fn test_cbc_reference_vector_hex() {
    let engine = BlowfishEngine::with_key(&unhex("0123456789abcdeff0e1d2c3b4a59687")).unwrap();
    let cipher = CbcCipher::new(&engine, Iv::from_hex("fe dc ba 98 76 54 32 10").unwrap());

    let plaintext = cipher
        .decrypt_hex(
            "6b77b4d63006dee6 05b156e274039793\n58deb9e7154616d9 59f1652bd5ff92cc",
        )
        .unwrap();
    assert_eq!(&plaintext[..28], b"7654321 Now is the time for ");
}

#[test]
fn test_zero_iv_single_block_matches_raw_blowfish() {
    let key = b"TESTKEY";
    let engine = BlowfishEngine::with_key(key).unwrap();
    let cipher = CbcCipher::new(&engine, Iv::new([0u8; 8]));

    let reference: Blowfish = Blowfish::new_from_slice(key).unwrap();
    let mut block = GenericArray::clone_from_slice(b"12345678");
    reference.encrypt_block(&mut block);

    assert_eq!(cipher.encrypt(b"12345678").unwrap(), block.to_vec());
}

#[test]
fn test_three_byte_key_matches_raw_blowfish_with_repeated_key() {
    let engine = BlowfishEngine::with_key(b"abc").unwrap();
    let cipher = CbcCipher::new(&engine, Iv::new([0u8; 8]));

    let reference: Blowfish = Blowfish::new_from_slice(b"abcabcabcabc").unwrap();
    let mut block = GenericArray::clone_from_slice(b"12345678");
    reference.encrypt_block(&mut block);

    let ciphertext = cipher.encrypt(b"12345678").unwrap();
    assert_eq!(ciphertext, block.to_vec());
    assert_eq!(ciphertext, unhex("5f16d854f8f12cf5"));
}

#[test]
fn test_zero_key_zero_block_vector() {
    let engine = BlowfishEngine::with_key(&[0u8; 8]).unwrap();
    let cipher = CbcCipher::new(&engine, Iv::new([0u8; 8]));

    assert_eq!(
        cipher.encrypt(&[0u8; 8]).unwrap(),
        unhex("4ef997456198dd78")
    );
}

#[test]
fn test_ten_byte_message_gets_sixteen_bytes() {
    let engine = BlowfishEngine::with_key(b"My secret key").unwrap();
    let cipher = CbcCipher::new(&engine, Iv::random());

    let ciphertext = cipher.encrypt(b"0123456789").unwrap();
    assert_eq!(ciphertext.len(), 16);
    assert_eq!(
        cipher.decrypt(&ciphertext).unwrap(),
        b"0123456789\0\0\0\0\0\0".to_vec()
    );
}

#[test]
fn test_key_must_be_set_first() {
    let mut engine = BlowfishEngine::new();
    {
        let cipher = CbcCipher::new(&engine, Iv::new([0u8; 8]));
        assert_eq!(cipher.encrypt(b"12345678"), Err(CbcError::UninitializedKey));
        assert_eq!(cipher.decrypt(b"12345678"), Err(CbcError::UninitializedKey));
    }

    engine.set_key(b"My secret key").unwrap();
    let cipher = CbcCipher::new(&engine, Iv::new([0u8; 8]));
    assert!(cipher.encrypt(b"12345678").is_ok());
}
