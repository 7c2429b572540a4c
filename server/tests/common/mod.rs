//! 集成测试共用的初始化和种子数据

use loja_server::{Config, ServerState};
use rust_decimal::Decimal;
use shared::models::{CategoriaCreate, ClienteCreate, EnderecoCreate, ProdutoCreate};
use tempfile::TempDir;

/// Fresh server state over a disk database in a temp directory.
///
/// The `TempDir` guard must stay alive for the duration of the test.
pub async fn setup() -> (ServerState, TempDir) {
    let dir = tempfile::tempdir().expect("tempdir");
    let db_path = dir.path().join("loja-test.db");
    let config = Config::with_database(db_path.to_str().unwrap());
    let state = ServerState::initialize(&config).await;
    (state, dir)
}

pub struct Fixture {
    pub cliente_id: i64,
    pub endereco_id: i64,
    pub produto_id: i64,
}

/// One cliente with an endereco and one produto with the given stock.
pub async fn seed(state: &ServerState, estoque: i64) -> Fixture {
    use loja_server::db::repository::{categoria, cliente, endereco, produto};

    let cliente = cliente::create(
        &state.db,
        ClienteCreate {
            nome: "Maria Silva".into(),
            email: format!("maria+{}@example.com", shared::util::snowflake_id()),
            senha: "s3nh4-forte".into(),
            telefone: None,
        },
        "$argon2id$fake-hash",
    )
    .await
    .expect("seed cliente");

    let endereco = endereco::create(
        &state.db,
        EnderecoCreate {
            cliente_id: cliente.id,
            rua: "Rua das Flores".into(),
            numero: "123".into(),
            complemento: None,
            bairro: "Centro".into(),
            cidade: "São Paulo".into(),
            estado: "SP".into(),
            cep: "01000-000".into(),
        },
    )
    .await
    .expect("seed endereco");

    let categoria = categoria::create(
        &state.db,
        CategoriaCreate {
            nome: format!("Eletrônicos {}", shared::util::snowflake_id()),
            descricao: None,
        },
    )
    .await
    .expect("seed categoria");

    let produto = produto::create(
        &state.db,
        ProdutoCreate {
            nome: "Fone de ouvido".into(),
            descricao: None,
            preco: Decimal::new(19990, 2),
            estoque: Some(estoque),
            imagem: None,
            categoria_id: categoria.id,
        },
    )
    .await
    .expect("seed produto");

    Fixture {
        cliente_id: cliente.id,
        endereco_id: endereco.id,
        produto_id: produto.id,
    }
}

/// Current (estoque, reservado) of a produto.
pub async fn ledger(state: &ServerState, produto_id: i64) -> (i64, i64) {
    let produto = loja_server::db::repository::produto::find_by_id(&state.db, produto_id)
        .await
        .expect("find produto")
        .expect("produto exists");
    (produto.estoque, produto.reservado)
}

/// Backdate a pedido so the sweeper sees it as expired.
pub async fn backdate_pedido(state: &ServerState, pedido_id: i64, millis_ago: i64) {
    sqlx::query("UPDATE pedido SET data_criacao = ? WHERE id = ?")
        .bind(shared::util::now_millis() - millis_ago)
        .bind(pedido_id)
        .execute(&state.db)
        .await
        .expect("backdate pedido");
}
