#![forbid(unsafe_code)]

#[derive(Debug)]
pub enum StoreError {
    Io(std::io::Error),
    Sql(rusqlite::Error),
    ColumnContract {
        expected: usize,
        actual: usize,
    },
    RowDecode {
        row: usize,
        source: rusqlite::Error,
    },
    RecipeNotFound {
        id: i64,
    },
    AmbiguousRecipe {
        id: i64,
        found: usize,
    },
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "io: {err}"),
            Self::Sql(err) => write!(f, "sqlite: {err}"),
            Self::ColumnContract { expected, actual } => write!(
                f,
                "join column contract violated (expected={expected}, actual={actual})"
            ),
            Self::RowDecode { row, source } => {
                write!(f, "row decode failed (row={row}): {source}")
            }
            Self::RecipeNotFound { id } => write!(f, "no recipe found (id={id})"),
            Self::AmbiguousRecipe { id, found } => {
                write!(f, "more than one recipe returned (id={id}, found={found})")
            }
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Sql(err) => Some(err),
            Self::RowDecode { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<std::io::Error> for StoreError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sql(value)
    }
}
