use wots_signatures::{OsSecureRandom, Scheme};

fn main() {
    // One scheme can be shared by every signer and verifier.
    let scheme = Scheme::sha256(OsSecureRandom::new());
    println!(
        "WOTS/SHA-256: private key {} bytes, public key {} bytes, signature {} bytes",
        scheme.private_key_size(),
        scheme.public_key_size(),
        scheme.signature_size()
    );

    let mut key = match scheme.generate_key() {
        Ok(key) => key,
        Err(e) => {
            eprintln!("key generation failed: {}", e);
            std::process::exit(1);
        }
    };
    let public_key = key.public_key().clone();
    println!("✓ Key pair generated, public key {}", hex::encode(public_key.as_bytes()));

    let message = b"Hello world!";
    let signature = match scheme.sign(&mut key, message) {
        Ok(signature) => signature,
        Err(e) => {
            eprintln!("signing failed: {}", e);
            std::process::exit(1);
        }
    };
    println!("✓ Message signed ({} byte signature)", signature.len());

    // After one signature the private key bytes are gone; only the public key is left.
    match scheme.sign(&mut key, b"second message") {
        Ok(_) => println!("✗ Private key signed twice"),
        Err(e) => println!("✓ Second signature refused: {}", e),
    }

    if scheme.verify(&public_key, message, &signature) {
        println!("✓ Signature verification succeeded");
    } else {
        println!("✗ Signature verification failed");
    }

    if !scheme.verify(&public_key, b"Hello world?", &signature) {
        println!("✓ Altered message rejected");
    }
}

