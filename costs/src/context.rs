use crate::OperationCost;

/// A value paired with the hashing it took to produce.
#[must_use]
#[derive(Debug, Eq, PartialEq)]
pub struct CostContext<T> {
    /// The produced value.
    pub value: T,
    /// Hashing spent producing it.
    pub cost: OperationCost,
}

impl<T> CostContext<T> {
    /// Drop the cost and keep the value.
    pub fn unwrap(self) -> T {
        self.value
    }

    /// Move the cost into `acc_cost` and return the value.
    pub fn unwrap_add_cost(self, acc_cost: &mut OperationCost) -> T {
        *acc_cost += self.cost;
        self.value
    }

    /// Transform the value, cost unchanged.
    pub fn map<B>(self, f: impl FnOnce(T) -> B) -> CostContext<B> {
        CostContext {
            value: f(self.value),
            cost: self.cost,
        }
    }

    /// Chain another costed step; both costs are summed.
    pub fn flat_map<B>(self, f: impl FnOnce(T) -> CostContext<B>) -> CostContext<B> {
        let next = f(self.value);
        CostContext {
            value: next.value,
            cost: self.cost + next.cost,
        }
    }
}

/// `Result` carrying the cost of the attempt, successful or not.
pub type CostResult<T, E> = CostContext<Result<T, E>>;

impl<T, E> CostResult<T, E> {
    /// Transform the `Ok` value, cost unchanged.
    pub fn map_ok<B>(self, f: impl FnOnce(T) -> B) -> CostResult<B, E> {
        self.map(|result| result.map(f))
    }

    /// Chain another fallible costed step. On `Err` the step is skipped and
    /// only the cost so far is kept.
    pub fn flat_map_ok<B>(self, f: impl FnOnce(T) -> CostResult<B, E>) -> CostResult<B, E> {
        match self.value {
            Ok(value) => f(value).with_added_cost(self.cost),
            Err(e) => CostContext {
                value: Err(e),
                cost: self.cost,
            },
        }
    }

    fn with_added_cost(mut self, cost: OperationCost) -> Self {
        self.cost += cost;
        self
    }
}

/// Attach a cost to any value.
pub trait CostsExt: Sized {
    /// Wrap `self` with `cost`.
    fn wrap_with_cost(self, cost: OperationCost) -> CostContext<Self> {
        CostContext { value: self, cost }
    }
}

impl<T> CostsExt for T {}
