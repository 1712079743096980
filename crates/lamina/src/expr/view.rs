//! Vector views into matrix expressions.
//!
//! Views over a writable matrix (or a `&mut` to one) are writable themselves, so they can be the
//! destination of an assignment.

use crate::{layout::Basis, MatrixExpr, MatrixExprMut, VectorExpr, VectorExprMut};

/// A single row of a matrix expression. Created by [`MatrixExpr::row`].
#[derive(Debug, Clone, Copy)]
pub struct Row<E> {
    expr: E,
    row: usize,
}

impl<E: MatrixExpr> Row<E> {
    #[track_caller]
    pub fn new(expr: E, row: usize) -> Self {
        let rows = expr.rows();
        assert!(row < rows, "row {row} out of bounds for a matrix with {rows} rows");
        Self { expr, row }
    }
}

impl<E: MatrixExpr> VectorExpr for Row<E> {
    type Elem = E::Elem;
    type Size = E::Cols;

    #[inline]
    fn dim(&self) -> E::Cols {
        self.expr.shape().1
    }

    #[inline]
    fn get(&self, i: usize) -> E::Elem {
        self.expr.get(self.row, i)
    }
}

impl<E: MatrixExprMut> VectorExprMut for Row<E> {
    #[inline]
    fn get_mut(&mut self, i: usize) -> &mut E::Elem {
        self.expr.get_mut(self.row, i)
    }
}

/// A single column of a matrix expression. Created by [`MatrixExpr::column`].
#[derive(Debug, Clone, Copy)]
pub struct Column<E> {
    expr: E,
    col: usize,
}

impl<E: MatrixExpr> Column<E> {
    #[track_caller]
    pub fn new(expr: E, col: usize) -> Self {
        let cols = expr.cols();
        assert!(col < cols, "column {col} out of bounds for a matrix with {cols} columns");
        Self { expr, col }
    }
}

impl<E: MatrixExpr> VectorExpr for Column<E> {
    type Elem = E::Elem;
    type Size = E::Rows;

    #[inline]
    fn dim(&self) -> E::Rows {
        self.expr.shape().0
    }

    #[inline]
    fn get(&self, i: usize) -> E::Elem {
        self.expr.get(i, self.col)
    }
}

impl<E: MatrixExprMut> VectorExprMut for Column<E> {
    #[inline]
    fn get_mut(&mut self, i: usize) -> &mut E::Elem {
        self.expr.get_mut(i, self.col)
    }
}

/// A basis vector of a matrix expression. Created by [`MatrixExpr::basis_vector`].
///
/// Depending on the basis orientation of the matrix, this is either a column or a row.
#[derive(Debug, Clone, Copy)]
pub struct BasisVector<E> {
    expr: E,
    index: usize,
}

impl<E: MatrixExpr> BasisVector<E> {
    #[track_caller]
    pub fn new(expr: E, index: usize) -> Self {
        // the number of basis vectors is the dimension a basis vector does *not* run along
        let count = if <E::Basis as Basis>::ROW_BASIS {
            expr.rows()
        } else {
            expr.cols()
        };
        assert!(
            index < count,
            "basis vector {index} out of bounds for a matrix with {count} basis vectors"
        );
        Self { expr, index }
    }
}

impl<E: MatrixExpr> VectorExpr for BasisVector<E> {
    type Elem = E::Elem;
    type Size = <E::Basis as Basis>::Size<E::Rows, E::Cols>;

    #[inline]
    fn dim(&self) -> Self::Size {
        let (rows, cols) = self.expr.shape();
        <E::Basis as Basis>::basis_size(rows, cols)
    }

    #[inline]
    fn get(&self, k: usize) -> E::Elem {
        let (row, col) = <E::Basis as Basis>::position(self.index, k);
        self.expr.get(row, col)
    }
}

impl<E: MatrixExprMut> VectorExprMut for BasisVector<E> {
    #[inline]
    fn get_mut(&mut self, k: usize) -> &mut E::Elem {
        let (row, col) = <E::Basis as Basis>::position(self.index, k);
        self.expr.get_mut(row, col)
    }
}

#[cfg(test)]
mod tests {
    use crate::*;

    #[rustfmt::skip]
    fn sample() -> Mat<i32, 2, 3> {
        Mat::from_rows([
            [1, 2, 3],
            [4, 5, 6],
        ])
    }

    #[test]
    fn rows_and_columns() {
        let m = sample();
        assert_eq!(m.row(1).eval(), [4, 5, 6]);
        assert_eq!(m.column(2).eval(), [3, 6]);
        assert_eq!((&m).row(0).size(), 3);
    }

    #[test]
    #[should_panic(expected = "row 2 out of bounds")]
    fn row_out_of_bounds() {
        sample().row(2);
    }

    #[test]
    fn write_through() {
        let mut m = sample();
        Row::new(&mut m, 0).try_assign(vec3(7, 8, 9)).unwrap();
        Column::new(&mut m, 0).try_add_assign(vec2(100, 100)).unwrap();
        assert_eq!(m, [[107, 8, 9], [104, 5, 6]]);
    }

    #[test]
    fn basis_vectors() {
        let col: Matrix<[[i32; 3]; 2], ColBasis> = Matrix::from_rows([[1, 2, 3], [4, 5, 6]]);
        assert_eq!(col.basis_vector(0).eval(), [1, 4]);
        let row: Matrix<[[i32; 3]; 2], RowBasis> = Matrix::from_rows([[1, 2, 3], [4, 5, 6]]);
        assert_eq!(row.basis_vector(1).eval(), [4, 5, 6]);
    }
}
