#[cfg(test)]
mod tests {
    use crate::error::AutogradError;
    use crate::graph::Graph;
    use crate::nn::init::Initializer;
    use crate::nn::{Activation, Layer, Mlp, MlpConfig, Module, Neuron};
    use approx::assert_abs_diff_eq;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn fixed_neuron<'g>(
        graph: &'g Graph,
        weights: &[f64],
        bias: f64,
        activation: Activation,
    ) -> Neuron<'g> {
        Neuron {
            weights: graph.create_values(weights),
            bias: graph.create_value(bias),
            activation,
        }
    }

    #[test]
    fn test_neuron_forward() {
        let graph = Graph::new();
        let neuron = fixed_neuron(&graph, &[0.5, -1.0], 0.25, Activation::Linear);
        let x = graph.create_values(&[2.0, 3.0]);

        let out = neuron.activate(&x).unwrap();
        assert_eq!(out.data(), 0.25 + 2.0 * 0.5 + 3.0 * -1.0);

        let tanh = fixed_neuron(&graph, &[0.5, -1.0], 0.25, Activation::Tanh);
        assert_abs_diff_eq!(tanh.activate(&x).unwrap().data(), (-1.75f64).tanh(), epsilon = 1e-12);

        let relu = fixed_neuron(&graph, &[0.5, -1.0], 0.25, Activation::Relu);
        assert_eq!(relu.activate(&x).unwrap().data(), 0.0);
    }

    #[test]
    fn test_neuron_gradients() {
        let graph = Graph::new();
        let neuron = fixed_neuron(&graph, &[0.5, -1.0, 2.0], 0.1, Activation::Relu);
        let x = graph.create_values(&[1.0, -2.0, 0.5]);

        let out = neuron.activate(&x).unwrap();
        out.backward().unwrap();

        for (w, xi) in neuron.weights.iter().zip(&x) {
            assert_eq!(w.grad(), xi.data());
        }
        for (xi, w) in x.iter().zip(&neuron.weights) {
            assert_eq!(xi.grad(), w.data());
        }
        assert_eq!(neuron.bias.grad(), 1.0);
    }

    #[test]
    fn test_dead_relu_neuron_passes_no_gradient() {
        let graph = Graph::new();
        let neuron = fixed_neuron(&graph, &[1.0], -5.0, Activation::Relu);
        let x = graph.create_values(&[2.0]);

        let out = neuron.activate(&x).unwrap();
        out.backward().unwrap();

        assert_eq!(out.data(), 0.0);
        assert!(neuron.parameters().iter().all(|p| p.grad() == 0.0));
    }

    #[test]
    fn test_neuron_rejects_wrong_input_size() {
        let graph = Graph::new();
        let mut rng = StdRng::seed_from_u64(0);
        let neuron = Neuron::new(&graph, 3, Activation::Relu, Initializer::default(), &mut rng).unwrap();

        let err = neuron.forward(&graph.create_values(&[1.0, 2.0])).unwrap_err();
        assert_eq!(err, AutogradError::InputSizeMismatch { expected: 3, actual: 2 });
        assert_eq!(neuron.num_parameters(), 4);
        assert_eq!(neuron.bias.data(), 0.0);
        assert!(neuron.weights.iter().all(|w| (-1.0..1.0).contains(&w.data())));
    }

    #[test]
    fn test_layer_forward() {
        let graph = Graph::new();
        let mut rng = StdRng::seed_from_u64(3);
        let layer = Layer::new(&graph, 2, 3, Activation::Tanh, Initializer::default(), &mut rng).unwrap();

        let out = layer.forward(&graph.create_values(&[1.0, -1.0])).unwrap();

        assert_eq!(out.len(), 3);
        assert_eq!(layer.num_inputs(), 2);
        assert_eq!(layer.num_outputs(), 3);
        assert_eq!(layer.num_parameters(), 9);
        assert!(out.iter().all(|o| o.data().abs() < 1.0));
        assert_eq!(layer.to_string(), "Layer of [TanhNeuron(2), TanhNeuron(2), TanhNeuron(2)]");
    }

    #[test]
    fn test_mlp_structure() {
        let graph = Graph::new();
        let mlp = Mlp::new(&graph, &MlpConfig::new(2, vec![3, 1])).unwrap();

        assert_eq!(mlp.layers.len(), 2);
        assert_eq!(mlp.num_inputs(), 2);
        assert_eq!(mlp.num_outputs(), 1);
        assert_eq!(mlp.num_parameters(), 3 * 3 + 4);
        assert_eq!(
            mlp.to_string(),
            "MLP of [Layer of [ReLUNeuron(2), ReLUNeuron(2), ReLUNeuron(2)], Layer of [LinearNeuron(3)]]"
        );
    }

    #[test]
    fn test_mlp_is_reproducible_from_seed() {
        let first_graph = Graph::new();
        let second_graph = Graph::new();
        let config = MlpConfig::new(3, vec![4, 2]).with_seed(99);

        let first = Mlp::new(&first_graph, &config).unwrap();
        let second = Mlp::new(&second_graph, &config).unwrap();
        let other = Mlp::new(&second_graph, &config.clone().with_seed(100)).unwrap();

        let data = |mlp: &Mlp<'_>| mlp.parameters().iter().map(|p| p.data()).collect::<Vec<_>>();
        assert_eq!(data(&first), data(&second));
        assert_ne!(data(&first), data(&other));
    }

    #[test]
    fn test_mlp_backward_and_zero_grad() {
        let graph = Graph::new();
        let config = MlpConfig::new(3, vec![4, 4, 1])
            .with_activation(Activation::Tanh)
            .with_seed(7);
        let mlp = Mlp::new(&graph, &config).unwrap();
        let x = graph.create_values(&[2.0, 3.0, -1.0]);

        let out = mlp.forward(&x).unwrap();
        assert_eq!(out.len(), 1);
        out[0].backward().unwrap();

        assert!(mlp.parameters().iter().any(|p| p.grad() != 0.0));
        // Output bias always receives the full gradient of a linear output.
        assert_eq!(mlp.layers[2].neurons[0].bias.grad(), 1.0);

        mlp.zero_grad();
        assert!(mlp.parameters().iter().all(|p| p.grad() == 0.0));
    }

    #[test]
    fn test_mlp_input_gradient_matches_finite_difference() {
        let graph = Graph::new();
        let config = MlpConfig::new(2, vec![5, 1])
            .with_activation(Activation::Tanh)
            .with_initializer(Initializer::XavierUniform { gain: 1.0 })
            .with_seed(11);
        let mlp = Mlp::new(&graph, &config).unwrap();

        let h = 1e-6;
        let x = graph.create_values(&[0.3, -0.7]);
        let out = mlp.forward(&x).unwrap()[0];
        out.backward().unwrap();

        let shifted = graph.create_values(&[0.3 + h, -0.7]);
        let out_shifted = mlp.forward(&shifted).unwrap()[0];
        let numeric = (out_shifted.data() - out.data()) / h;

        assert_abs_diff_eq!(x[0].grad(), numeric, epsilon = 1e-4);
    }

    #[test]
    fn test_mlp_rejects_invalid_config() {
        let graph = Graph::new();

        assert!(matches!(
            Mlp::new(&graph, &MlpConfig::new(2, vec![])),
            Err(AutogradError::InvalidConfig(_))
        ));
        assert!(matches!(
            Mlp::new(&graph, &MlpConfig::new(2, vec![3, 0, 1])),
            Err(AutogradError::InvalidConfig(_))
        ));
        assert!(matches!(
            Mlp::new(&graph, &MlpConfig::new(0, vec![1])),
            Err(AutogradError::InvalidConfig(_))
        ));
        assert!(graph.is_empty());
    }

    #[test]
    fn test_mlp_rejects_wrong_input_size() {
        let graph = Graph::new();
        let mlp = Mlp::new(&graph, &MlpConfig::new(3, vec![2, 1])).unwrap();

        assert_eq!(
            mlp.forward(&graph.create_values(&[1.0])).unwrap_err(),
            AutogradError::InputSizeMismatch { expected: 3, actual: 1 }
        );
    }
}
