//! Carrinho Repository
//!
//! 每个 cliente 惰性创建唯一购物车。购物车不触碰库存账本，
//! 只在加入时做一次当前库存的提示性检查。

use super::{RepoError, RepoResult};
use shared::models::{
    AddItemCarrinho, Carrinho, ItemCarrinhoDetalhe, ItemCarrinhoRow, Produto, ProdutoRow,
};
use sqlx::SqlitePool;

/// Load (or lazily create) the cart of a cliente, with itens and produtos.
pub async fn find_or_create(pool: &SqlitePool, cliente_id: i64) -> RepoResult<Carrinho> {
    if !super::cliente::exists(pool, cliente_id).await? {
        return Err(RepoError::NotFound("Cliente não encontrado".into()));
    }

    let carrinho_id = match carrinho_id_of(pool, cliente_id).await? {
        Some(id) => id,
        None => {
            let id = shared::util::snowflake_id();
            sqlx::query("INSERT INTO carrinho (id, cliente_id) VALUES (?1, ?2)")
                .bind(id)
                .bind(cliente_id)
                .execute(pool)
                .await?;
            id
        }
    };

    let itens = load_itens(pool, carrinho_id).await?;
    Ok(Carrinho {
        id: carrinho_id,
        cliente_id,
        itens,
    })
}

async fn carrinho_id_of(pool: &SqlitePool, cliente_id: i64) -> RepoResult<Option<i64>> {
    let id: Option<i64> = sqlx::query_scalar("SELECT id FROM carrinho WHERE cliente_id = ?")
        .bind(cliente_id)
        .fetch_optional(pool)
        .await?;
    Ok(id)
}

async fn load_itens(pool: &SqlitePool, carrinho_id: i64) -> RepoResult<Vec<ItemCarrinhoDetalhe>> {
    let rows: Vec<ItemCarrinhoRow> = sqlx::query_as(
        "SELECT id, carrinho_id, produto_id, quantidade FROM item_carrinho WHERE carrinho_id = ? ORDER BY id",
    )
    .bind(carrinho_id)
    .fetch_all(pool)
    .await?;

    let mut itens = Vec::with_capacity(rows.len());
    for row in rows {
        let produto: ProdutoRow = sqlx::query_as(
            "SELECT id, nome, descricao, preco_centavos, estoque, reservado, imagem, status_ativo, categoria_id \
             FROM produto WHERE id = ?",
        )
        .bind(row.produto_id)
        .fetch_one(pool)
        .await?;
        itens.push(ItemCarrinhoDetalhe {
            id: row.id,
            produto: Produto::from(produto),
            quantidade: row.quantidade,
        });
    }
    Ok(itens)
}

/// Add an item, merging quantidade when the produto is already in the cart.
pub async fn add_item(
    pool: &SqlitePool,
    cliente_id: i64,
    data: AddItemCarrinho,
) -> RepoResult<Carrinho> {
    let carrinho = find_or_create(pool, cliente_id).await?;

    let produto = super::produto::find_by_id(pool, data.produto_id)
        .await?
        .filter(|p| p.status_ativo)
        .ok_or_else(|| RepoError::NotFound("Produto não encontrado".into()))?;

    let existente = carrinho
        .itens
        .iter()
        .find(|item| item.produto.id == data.produto_id);
    let quantidade_total = data.quantidade + existente.map_or(0, |item| item.quantidade);

    // Advisory check only; the binding check happens when the pedido is created
    if produto.estoque < quantidade_total {
        return Err(RepoError::Validation(format!(
            "Estoque insuficiente. Disponível: {}",
            produto.estoque
        )));
    }

    match existente {
        Some(item) => {
            sqlx::query("UPDATE item_carrinho SET quantidade = ? WHERE id = ?")
                .bind(quantidade_total)
                .bind(item.id)
                .execute(pool)
                .await?;
        }
        None => {
            sqlx::query(
                "INSERT INTO item_carrinho (id, carrinho_id, produto_id, quantidade) VALUES (?1, ?2, ?3, ?4)",
            )
            .bind(shared::util::snowflake_id())
            .bind(carrinho.id)
            .bind(data.produto_id)
            .bind(data.quantidade)
            .execute(pool)
            .await?;
        }
    }

    find_or_create(pool, cliente_id).await
}

/// Change the quantidade of one cart item.
pub async fn update_item(
    pool: &SqlitePool,
    cliente_id: i64,
    item_id: i64,
    quantidade: i64,
) -> RepoResult<Carrinho> {
    let carrinho = find_or_create(pool, cliente_id).await?;

    let result = sqlx::query("UPDATE item_carrinho SET quantidade = ?1 WHERE id = ?2 AND carrinho_id = ?3")
        .bind(quantidade)
        .bind(item_id)
        .bind(carrinho.id)
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(RepoError::NotFound("Item não encontrado no carrinho".into()));
    }

    find_or_create(pool, cliente_id).await
}

/// Remove one item. The item must belong to this cliente's cart.
pub async fn remove_item(pool: &SqlitePool, cliente_id: i64, item_id: i64) -> RepoResult<Carrinho> {
    let carrinho = find_or_create(pool, cliente_id).await?;

    let result = sqlx::query("DELETE FROM item_carrinho WHERE id = ?1 AND carrinho_id = ?2")
        .bind(item_id)
        .bind(carrinho.id)
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(RepoError::NotFound("Item não encontrado no carrinho".into()));
    }

    find_or_create(pool, cliente_id).await
}

/// Drop every item of the cliente's cart.
pub async fn clear(pool: &SqlitePool, cliente_id: i64) -> RepoResult<()> {
    let carrinho = find_or_create(pool, cliente_id).await?;
    sqlx::query("DELETE FROM item_carrinho WHERE carrinho_id = ?")
        .bind(carrinho.id)
        .execute(pool)
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use shared::models::{CategoriaCreate, ClienteCreate, ProdutoCreate};
    use sqlx::sqlite::SqlitePoolOptions;

    async fn test_pool() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        sqlx::migrate!("./migrations").run(&pool).await.unwrap();
        pool
    }

    async fn seed(pool: &SqlitePool) -> (i64, i64) {
        let cliente = crate::db::repository::cliente::create(
            pool,
            ClienteCreate {
                nome: "Ana".into(),
                email: "ana@example.com".into(),
                senha: "segredo".into(),
                telefone: None,
            },
            "$argon2id$fake",
        )
        .await
        .unwrap();
        let categoria = crate::db::repository::categoria::create(
            pool,
            CategoriaCreate {
                nome: "Papelaria".into(),
                descricao: None,
            },
        )
        .await
        .unwrap();
        let produto = crate::db::repository::produto::create(
            pool,
            ProdutoCreate {
                nome: "Caderno".into(),
                descricao: None,
                preco: Decimal::new(1550, 2),
                estoque: Some(5),
                imagem: None,
                categoria_id: categoria.id,
            },
        )
        .await
        .unwrap();
        (cliente.id, produto.id)
    }

    #[tokio::test]
    async fn cart_is_created_lazily_and_is_stable() {
        let pool = test_pool().await;
        let (cliente_id, _) = seed(&pool).await;

        let first = find_or_create(&pool, cliente_id).await.unwrap();
        let second = find_or_create(&pool, cliente_id).await.unwrap();
        assert_eq!(first.id, second.id);
        assert!(first.itens.is_empty());
    }

    #[tokio::test]
    async fn add_merges_same_produto() {
        let pool = test_pool().await;
        let (cliente_id, produto_id) = seed(&pool).await;

        add_item(
            &pool,
            cliente_id,
            AddItemCarrinho {
                produto_id,
                quantidade: 2,
            },
        )
        .await
        .unwrap();
        let carrinho = add_item(
            &pool,
            cliente_id,
            AddItemCarrinho {
                produto_id,
                quantidade: 1,
            },
        )
        .await
        .unwrap();

        assert_eq!(carrinho.itens.len(), 1);
        assert_eq!(carrinho.itens[0].quantidade, 3);
    }

    #[tokio::test]
    async fn add_beyond_stock_rejected() {
        let pool = test_pool().await;
        let (cliente_id, produto_id) = seed(&pool).await;

        let err = add_item(
            &pool,
            cliente_id,
            AddItemCarrinho {
                produto_id,
                quantidade: 6,
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, RepoError::Validation(_)));
    }

    #[tokio::test]
    async fn update_remove_and_clear() {
        let pool = test_pool().await;
        let (cliente_id, produto_id) = seed(&pool).await;

        let carrinho = add_item(
            &pool,
            cliente_id,
            AddItemCarrinho {
                produto_id,
                quantidade: 2,
            },
        )
        .await
        .unwrap();
        let item_id = carrinho.itens[0].id;

        let carrinho = update_item(&pool, cliente_id, item_id, 4).await.unwrap();
        assert_eq!(carrinho.itens[0].quantidade, 4);

        let carrinho = remove_item(&pool, cliente_id, item_id).await.unwrap();
        assert!(carrinho.itens.is_empty());

        // Item of another cart is invisible
        let err = remove_item(&pool, cliente_id, item_id).await.unwrap_err();
        assert!(matches!(err, RepoError::NotFound(_)));

        clear(&pool, cliente_id).await.unwrap();
    }
}
