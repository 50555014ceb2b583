use crate::ast;
use crate::builtins;
use crate::environment::Environment;
use crate::object::{EvalError, FunctionObject, Object, Result, FALSE, NULL, TRUE};
use log::{debug, trace};

/// Evaluates an operand; a pending return signal unwinds past the enclosing
/// construct instead of being used as a value.
macro_rules! operand {
    ($e:expr) => {{
        let value = $e?;
        if value.is_return_value() {
            return Ok(value);
        }
        value
    }};
}

/// Evaluates a whole program against `env`, which persists between calls in an
/// interactive session. Yields `None` when the program produced no value (it
/// was empty, or ended with a `let`). Runtime errors come back as
/// `Object::Error`.
pub fn eval(program: &ast::Program, env: &Environment) -> Option<Object> {
    match eval_program(program, env) {
        Ok(value) => value,
        Err(err) => {
            debug!("evaluation stopped: {}", err);
            Some(err.into())
        }
    }
}

fn eval_program(program: &ast::Program, env: &Environment) -> Result<Option<Object>> {
    let mut result = None;

    for stmt in program.statements.iter() {
        match eval_statement(stmt, env)? {
            Some(Object::ReturnValue(value)) => return Ok(Some(*value)),
            value => result = value,
        }
    }

    Ok(result)
}

fn eval_block_statement(block: &ast::BlockStatement, env: &Environment) -> Result<Object> {
    let mut result = NULL;

    for stmt in block.statements.iter() {
        result = eval_statement(stmt, env)?.unwrap_or(NULL);
        if result.is_return_value() {
            break;
        }
    }

    Ok(result)
}

fn eval_statement(stmt: &ast::Statement, env: &Environment) -> Result<Option<Object>> {
    match stmt {
        ast::Statement::Expr(stmt) => eval_expression(&stmt.expression, env).map(Some),
        ast::Statement::Return(stmt) => {
            let value = eval_expression(&stmt.return_value, env)?;
            if value.is_return_value() {
                return Ok(Some(value));
            }
            Ok(Some(Object::ReturnValue(Box::new(value))))
        }
        ast::Statement::Let(stmt) => {
            let value = eval_expression(&stmt.value, env)?;
            if value.is_return_value() {
                return Ok(Some(value));
            }
            env.set(&stmt.name.value, value);
            Ok(None)
        }
    }
}

fn eval_expression(expr: &ast::Expression, env: &Environment) -> Result<Object> {
    match expr {
        ast::Expression::Identifier(ident) => eval_identifier(ident, env),
        ast::Expression::IntegerLiteral(n) => Ok(Object::Integer(*n)),
        ast::Expression::String(s) => Ok(Object::String(s.value.clone())),
        ast::Expression::Boolean(b) => Ok(native_bool_to_boolean_object(b.0)),
        ast::Expression::Prefix(prefix) => {
            let right = operand!(eval_expression(&prefix.right, env));
            eval_prefix_expression(prefix.operator, right)
        }
        ast::Expression::Infix(infix) => {
            let left = operand!(eval_expression(&infix.left, env));
            let right = operand!(eval_expression(&infix.right, env));
            eval_infix_expression(infix.operator, left, right)
        }
        ast::Expression::If(if_expr) => eval_if_expression(if_expr, env),
        ast::Expression::Function(func) => Ok(Object::Function(FunctionObject {
            parameters: func.parameters.clone(),
            body: func.body.clone(),
            env: env.clone(),
        })),
        ast::Expression::Call(call) => {
            let function = operand!(eval_expression(&call.function, env));

            let mut arguments = Vec::with_capacity(call.arguments.len());
            for argument in call.arguments.iter() {
                arguments.push(operand!(eval_expression(argument, env)));
            }

            apply_function(function, arguments)
        }
    }
}

fn eval_identifier(ident: &ast::Identifier, env: &Environment) -> Result<Object> {
    env.get(&ident.value)
        .or_else(|| builtins::lookup(&ident.value))
        .ok_or_else(|| EvalError::IdentifierNotFound {
            id: ident.value.clone(),
        })
}

fn native_bool_to_boolean_object(value: bool) -> Object {
    if value {
        TRUE
    } else {
        FALSE
    }
}

fn eval_prefix_expression(operator: ast::Operator, right: Object) -> Result<Object> {
    match operator {
        ast::Operator::Bang => Ok(native_bool_to_boolean_object(!right.truth_value())),
        ast::Operator::Minus => match right {
            Object::Integer(n) => Ok(Object::Integer(n.wrapping_neg())),
            obj => Err(EvalError::UnknownPrefixOperator {
                operator,
                operand: obj.type_name(),
            }),
        },
        _ => Err(EvalError::UnknownPrefixOperator {
            operator,
            operand: right.type_name(),
        }),
    }
}

fn eval_infix_expression(operator: ast::Operator, left: Object, right: Object) -> Result<Object> {
    match (&left, &right) {
        (Object::Integer(x), Object::Integer(y)) => {
            eval_integer_infix_expression(operator, *x, *y)
        }
        (Object::Boolean(x), Object::Boolean(y)) => match operator {
            ast::Operator::Eq => Ok(native_bool_to_boolean_object(x == y)),
            ast::Operator::NotEq => Ok(native_bool_to_boolean_object(x != y)),
            _ => Err(EvalError::binary_op_error("BOOLEAN", operator, "BOOLEAN")),
        },
        (Object::String(x), Object::String(y)) => match operator {
            ast::Operator::Plus => Ok(Object::String(format!("{}{}", x, y))),
            _ => Err(EvalError::binary_op_error("STRING", operator, "STRING")),
        },
        _ => Err(EvalError::binary_op_error(
            left.type_name(),
            operator,
            right.type_name(),
        )),
    }
}

fn eval_integer_infix_expression(operator: ast::Operator, left: i64, right: i64) -> Result<Object> {
    Ok(match operator {
        ast::Operator::Plus => Object::Integer(left.wrapping_add(right)),
        ast::Operator::Minus => Object::Integer(left.wrapping_sub(right)),
        ast::Operator::Asterisk => Object::Integer(left.wrapping_mul(right)),
        ast::Operator::Slash => {
            if right == 0 {
                return Err(EvalError::DivisionByZero);
            }
            Object::Integer(left.wrapping_div(right))
        }
        ast::Operator::LT => native_bool_to_boolean_object(left < right),
        ast::Operator::GT => native_bool_to_boolean_object(left > right),
        ast::Operator::Eq => native_bool_to_boolean_object(left == right),
        ast::Operator::NotEq => native_bool_to_boolean_object(left != right),
        ast::Operator::Bang => {
            return Err(EvalError::binary_op_error("INTEGER", operator, "INTEGER"))
        }
    })
}

// If-blocks run in the caller's scope; only function calls open a new one.
fn eval_if_expression(if_expr: &ast::IfExpression, env: &Environment) -> Result<Object> {
    let condition = operand!(eval_expression(&if_expr.condition, env));

    if condition.truth_value() {
        eval_block_statement(&if_expr.consequence, env)
    } else if let Some(alternative) = &if_expr.alternative {
        eval_block_statement(alternative, env)
    } else {
        Ok(NULL)
    }
}

fn apply_function(function: Object, arguments: Vec<Object>) -> Result<Object> {
    match function {
        Object::Function(func) => {
            if func.parameters.len() != arguments.len() {
                return Err(EvalError::IncorrectArity {
                    got: arguments.len(),
                    want: func.parameters.len(),
                });
            }
            trace!("calling {}", func);

            let env = Environment::new_enclosed(&func.env);
            for (parameter, argument) in func.parameters.iter().zip(arguments) {
                env.set(&parameter.value, argument);
            }

            Ok(eval_block_statement(&func.body, &env)?.unwrap_return())
        }
        Object::Builtin(builtin) => builtin.call(arguments),
        obj => Err(EvalError::NotAFunction {
            type_name: obj.type_name(),
        }),
    }
}
