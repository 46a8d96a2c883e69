#![allow(dead_code)]

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Serve `body` with `status` to every connection until the runtime shuts down.
/// Returns the base URL of the listener.
pub async fn serve(status: u16, body: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        loop {
            let Ok((mut sock, _)) = listener.accept().await else {
                return;
            };
            tokio::spawn(async move {
                // read until the end of the request head; GETs carry no body
                let mut buf = Vec::new();
                let mut chunk = [0u8; 1024];
                while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
                    match sock.read(&mut chunk).await {
                        Ok(0) | Err(_) => return,
                        Ok(n) => buf.extend_from_slice(&chunk[..n]),
                    }
                }
                let head = format!(
                    "HTTP/1.1 {} X\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                    status,
                    body.len()
                );
                let _ = sock.write_all(head.as_bytes()).await;
                let _ = sock.write_all(body.as_bytes()).await;
                let _ = sock.shutdown().await;
            });
        }
    });

    format!("http://{}/wstempus/js/ES/DATOS_TABLA/24900", addr)
}

/// Accept connections and hold them open without ever answering.
pub async fn serve_silent() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((sock, _)) = listener.accept().await {
            held.push(sock);
        }
    });

    format!("http://{}/wstempus/js/ES/DATOS_TABLA/24900", addr)
}

pub const SNAPSHOT: &str = r#"[
  {"COD": "EPF1", "Nombre": "Base 2006. Anual. Total Nacional. Alimentos. Gasto medio por hogar. Distribución (porcentajes verticales). Total.",
   "Data": [
     {"Fecha": 1640991600000, "Anyo": 2022, "Valor": 20.0, "Secreto": false},
     {"Fecha": 1609455600000, "Anyo": 2021, "Valor": 19.5, "Secreto": false}
   ]},
  {"COD": "EPF2", "Nombre": "Base 2006. Anual. Total Nacional. Vivienda. Gasto medio por hogar. Distribución (porcentajes verticales). Total.",
   "Data": [
     {"Anyo": 2022, "Valor": 30.0, "Secreto": false}
   ]},
  {"COD": "EPF3", "Nombre": "Base 2006. Anual. Total Nacional. Transporte. Gasto medio por hogar. Distribución (porcentajes verticales). Total.",
   "Data": [
     {"Anyo": 2022, "Valor": 50.0, "Secreto": false}
   ]},
  {"COD": "EPF4", "Nombre": "Base 2006. Anual. Total Nacional. Índice general. Gasto medio por hogar. Distribución (porcentajes verticales). Total.",
   "Data": [
     {"Anyo": 2022, "Valor": 100.0, "Secreto": false}
   ]},
  {"COD": "EPF5", "Nombre": "Base 2006. Anual. Total Nacional. Alimentos. Gasto medio por hogar. Dato base.",
   "Data": [
     {"Anyo": 2022, "Valor": null, "Secreto": true}
   ]}
]"#;
