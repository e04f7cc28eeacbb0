//! Testes do buffer limitado

use crate::chardev::buffer::BoundedBuffer;

#[test]
fn test_buffer_novo_vazio_e_zerado() {
    let buf: BoundedBuffer<16> = BoundedBuffer::new();
    assert_eq!(buf.len(), 0);
    assert!(buf.is_empty());
    assert_eq!(buf.capacity(), 16);
    assert_eq!(buf.max_len(), 15);
    assert_eq!(buf.bytes(), &[] as &[u8]);
}

#[test]
fn test_replace_grava_e_ajusta_comprimento() {
    let mut buf: BoundedBuffer<16> = BoundedBuffer::new();
    let n = buf.replace(b"abc");
    assert_eq!(n, 3);
    assert_eq!(buf.len(), 3);
    assert_eq!(buf.bytes(), b"abc");
}

#[test]
fn test_replace_trunca_no_max_len() {
    let mut buf: BoundedBuffer<8> = BoundedBuffer::new();
    let n = buf.replace(b"0123456789");
    // Capacidade 8, um byte de terminador: só 7 bytes ficam
    assert_eq!(n, 7);
    assert_eq!(buf.len(), 7);
    assert_eq!(buf.bytes(), b"0123456");
}

#[test]
fn test_replace_nao_deixa_residuos() {
    let mut buf: BoundedBuffer<16> = BoundedBuffer::new();
    buf.replace(b"aaaaaaaaaa");
    buf.replace(b"bb");

    assert_eq!(buf.bytes(), b"bb");
    // Substituição total: nada da escrita anterior sobrevive
    let mut longa = [0u8; 16];
    longa[..2].copy_from_slice(b"bb");
    let n = buf.replace(&longa[..10]);
    assert_eq!(n, 10);
    assert_eq!(&buf.bytes()[2..], &[0u8; 8]);
}

#[test]
fn test_replace_vazio() {
    let mut buf: BoundedBuffer<16> = BoundedBuffer::new();
    buf.replace(b"xyz");
    let n = buf.replace(b"");
    assert_eq!(n, 0);
    assert!(buf.is_empty());
}

#[test]
fn test_clear_zera_tudo() {
    let mut buf: BoundedBuffer<16> = BoundedBuffer::new();
    buf.replace(b"conteudo");
    buf.clear();
    assert_eq!(buf.len(), 0);
    assert_eq!(buf.bytes(), &[] as &[u8]);
}
