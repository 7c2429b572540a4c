//! 数据模型
//!
//! 每个资源一个文件：实体 + Create/Update DTO。
//! 实体字段与 SQLite 列一一对应；JSON 侧统一使用 camelCase
//! (`clienteId`, `precoVenda`...)，与 web 前端的约定一致。

pub mod carrinho;
pub mod categoria;
pub mod cliente;
pub mod endereco;
pub mod pagamento;
pub mod pedido;
pub mod produto;

pub use carrinho::{AddItemCarrinho, Carrinho, ItemCarrinhoDetalhe, UpdateItemCarrinho};
pub use categoria::{Categoria, CategoriaCreate, CategoriaUpdate};
pub use cliente::{Cliente, ClienteCreate};
pub use endereco::{Endereco, EnderecoCreate, EnderecoUpdate};
pub use pagamento::{MetodoPagamento, Pagamento, PagamentoStatus, ProcessarPagamento};
pub use pedido::{
    AtualizarStatusPedido, CreatePedido, ItemPedidoDetalhe, ItemPedidoInput, Pedido,
    PedidoDetalhe, PedidoStatus,
};
pub use produto::{Produto, ProdutoCreate, ProdutoFiltro, ProdutoUpdate};

#[cfg(feature = "db")]
pub use carrinho::ItemCarrinhoRow;
#[cfg(feature = "db")]
pub use pagamento::PagamentoRow;
#[cfg(feature = "db")]
pub use pedido::{ItemPedidoRow, PedidoRow};
#[cfg(feature = "db")]
pub use produto::ProdutoRow;
