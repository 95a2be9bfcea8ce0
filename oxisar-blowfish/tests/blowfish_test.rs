//! Blowfish known-answer and involution tests.

use oxisar_blowfish::Blowfish;
use oxisar_core::BlockCipher;

/// Symbol Art payload key.
const SAR_KEY: [u8; 4] = [0x09, 0x07, 0xC1, 0x2B];

fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

#[test]
fn test_standard_vector_zero_key() {
    // Classic Blowfish vector: key 00..00, plaintext 00..00.
    let cipher = Blowfish::new(&[0u8; 8]);
    assert_eq!(cipher.encrypt_block(0, 0), (0x4EF99745, 0x6198DD78));
}

#[test]
fn test_standard_vector_ones_key() {
    // Classic Blowfish vector: key FF..FF, plaintext FF..FF.
    let cipher = Blowfish::new(&[0xFFu8; 8]);
    assert_eq!(
        cipher.encrypt_block(0xFFFFFFFF, 0xFFFFFFFF),
        (0x51866FD5, 0xB85ECB8A)
    );
}

#[test]
fn test_standard_vector_byte_layout() {
    // Output words are stored little-endian, R half first.
    let cipher = Blowfish::new(&[0u8; 8]);
    let mut block = [0u8; 8];
    cipher.encrypt(&mut block);
    assert_eq!(block, [0x45, 0x97, 0xF9, 0x4E, 0x78, 0xDD, 0x98, 0x61]);
}

#[test]
fn test_sar_key_vectors() {
    let cipher = Blowfish::new(&SAR_KEY);

    let mut zeros = [0u8; 8];
    cipher.encrypt(&mut zeros);
    assert_eq!(hex(&zeros), "2b055f6419f0810e");

    let mut counting = [0, 1, 2, 3, 4, 5, 6, 7];
    cipher.encrypt(&mut counting);
    assert_eq!(hex(&counting), "3dcf0a621e0deb6e");

    cipher.decrypt(&mut counting);
    assert_eq!(counting, [0, 1, 2, 3, 4, 5, 6, 7]);
}

#[test]
fn test_involution_aligned_buffers() {
    let cipher = Blowfish::new(&SAR_KEY);
    for blocks in [1usize, 2, 7, 64] {
        let original: Vec<u8> = (0..blocks * 8).map(|i| (i * 37 + 11) as u8).collect();
        let mut data = original.clone();
        cipher.encrypt(&mut data);
        assert_ne!(data, original);
        cipher.decrypt(&mut data);
        assert_eq!(data, original, "{blocks} blocks");
    }
}

#[test]
fn test_involution_other_keys() {
    for key in [&b"abcdefgh"[..], &b"longer key material!"[..], &[0x01, 0x02, 0x03, 0x04][..]] {
        let cipher = Blowfish::new(key);
        let original = b"0123456789abcdef".to_vec();
        let mut data = original.clone();
        cipher.encrypt(&mut data);
        cipher.decrypt(&mut data);
        assert_eq!(data, original);
    }
}

#[test]
fn test_blocks_are_independent() {
    // ECB: identical plaintext blocks give identical ciphertext blocks.
    let cipher = Blowfish::new(&SAR_KEY);
    let mut data = [0x5Au8; 16];
    cipher.encrypt(&mut data);
    assert_eq!(data[..8], data[8..]);
}

#[test]
fn test_block_cipher_trait() {
    fn roundtrip<C: BlockCipher>(cipher: &C, data: &mut [u8]) {
        cipher.encrypt(data);
        cipher.decrypt(data);
    }

    assert_eq!(<Blowfish as BlockCipher>::BLOCK_SIZE, 8);
    assert_eq!(Blowfish::aligned_len(31), 24);

    let cipher = Blowfish::new(&SAR_KEY);
    let mut data: Vec<u8> = (0..31).collect();
    roundtrip(&cipher, &mut data);
    assert_eq!(data, (0..31).collect::<Vec<u8>>());
}
